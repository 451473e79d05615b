pub(crate) mod no_warning_comments;
