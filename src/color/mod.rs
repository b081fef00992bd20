mod hsv;
mod order;
mod utils;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use hsv::{HsvConversion, hsv2rgb_float, hsv2rgb_spectrum};
pub use order::ColorOrder;
pub use utils::rgb2hsv;

pub type Rgb = RGB8;
pub type Hsv = HSV;
