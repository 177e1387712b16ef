pub mod emitter;
pub mod fetcher;
pub mod lexicon;
