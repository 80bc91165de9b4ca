// Validators for literal formats that the linted language embeds in plain
// string constants. Regular expressions are validated with the regex crate
// directly; the reference-layout and template grammars live here.

pub mod template;
pub mod timefmt;
