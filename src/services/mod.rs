pub mod alias;
pub mod auth;
pub mod clicks;
pub mod keys;
pub mod links;
pub mod normalize;
pub mod session;
