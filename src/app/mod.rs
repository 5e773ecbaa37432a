pub mod dto;
pub mod pipeline;
pub mod projector;
