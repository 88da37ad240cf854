// Test suite for the passport registry pipeline

pub mod codec_tests;
