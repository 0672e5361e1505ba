mod test_utils;
mod indexer_tests;
mod window_tests;
