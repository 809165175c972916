pub(crate) mod keys;
pub(crate) mod layout;
pub(crate) mod render;
