mod exchange;
mod routes;

pub use exchange::Exchange;
pub use routes::ExchangeRoutes;
