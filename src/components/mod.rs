mod icon_button;

pub use icon_button::IconButton;
