// Integration tests for depbuild

mod integration {
    mod cli_test;
    mod end_to_end_test;
    mod nodejs_builder_test;
    mod scanner_test;
}
