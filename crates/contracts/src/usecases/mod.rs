pub mod common;
pub mod u508_creative_direction;
