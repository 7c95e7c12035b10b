//! Integration tests for the vcfload library.
//!
//! These tests drive `VcfLoader::run` end-to-end — reader, parser pool and
//! writer on real threads — against temp files and test sinks.

mod helpers;
mod test_load_pipeline;
mod test_sqlite_sink;
