use crate::exchange::Exchange;
use leptos::prelude::{component, view};
use leptos_router::{components::Route, MatchNestedRoutes};
use leptos_router_macro::path;

#[component(transparent)]
pub fn ExchangeRoutes() -> impl MatchNestedRoutes + Clone {
    view! {
        <Route path=path!("/") view=Exchange/>
    }
    .into_inner()
}
