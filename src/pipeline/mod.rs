pub(crate) mod context;
pub(crate) mod opts;
pub(crate) mod run;
