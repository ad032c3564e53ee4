extern crate proc_macro;

use proc_macro::TokenStream;

/// Generates mapping constructors for every `#[map_from(...)]` struct of an
/// inline module.
///
/// Accepts `access = "public" | "internal" | "private"`, `docs = bool` and
/// `nullable = bool`.
#[proc_macro_attribute]
pub fn mappings(args: TokenStream, input: TokenStream) -> TokenStream {
    match mapto_codegen::generate(args.into(), input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
