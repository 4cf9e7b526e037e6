pub(crate) mod model;
pub(crate) mod parallax;
pub(crate) mod select;
