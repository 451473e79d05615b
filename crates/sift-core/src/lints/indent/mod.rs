pub(crate) mod indent;
