mod ring;
mod text;

pub use ring::BoundedDeque;
pub use text::truncate_display;
