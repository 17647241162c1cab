mod floor;
mod layout;
mod machine;

#[doc(inline)]
pub use floor::DEFAULT_BOUNDARY_PENALTY;
#[doc(inline)]
pub use floor::Floor;
#[doc(inline)]
pub use floor::LayoutConfig;
#[doc(inline)]
pub use layout::FlowLeg;
#[doc(inline)]
pub use layout::Layout;
#[doc(inline)]
pub use machine::Machine;
