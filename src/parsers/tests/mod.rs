mod table_extractor_tests;
