mod account_test;
mod collection_test;
mod helpers;
