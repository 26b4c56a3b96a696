pub mod images;
pub mod misc;
pub mod system;

pub use images::{cat, cat_bomb, shibe, shibe_bomb};
pub use misc::{reload_settings, test};
pub use system::stop;
