pub(crate) mod raw_array;
