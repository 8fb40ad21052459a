#[allow(non_snake_case)]
pub mod ReactionOrder;
pub mod cli;
pub mod settings;
