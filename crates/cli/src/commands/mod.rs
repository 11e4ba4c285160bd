pub(crate) mod lookup;
pub(crate) mod serve;
