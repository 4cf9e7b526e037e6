pub(crate) mod lines;
pub(crate) mod lookup;
pub(crate) mod model;
pub(crate) mod parse;
