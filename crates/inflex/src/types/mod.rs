mod inflections;
mod loose;
mod strict;
mod token;

pub use inflections::LocaleInflections;
pub use loose::LooseStore;
pub use strict::StrictStore;
pub use token::Token;
