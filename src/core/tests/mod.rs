mod wfibe_tests;
