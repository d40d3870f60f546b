pub(crate) mod halloween;
pub(crate) mod model;
