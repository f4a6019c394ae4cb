pub(crate) mod camera;
pub(crate) mod page;
pub(crate) mod state;
