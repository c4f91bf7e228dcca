mod contracts;

pub use contracts::{decode_uint256, IErc20, ITokenExchange};
