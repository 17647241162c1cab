mod point;

#[doc(inline)]
pub use point::Point;
