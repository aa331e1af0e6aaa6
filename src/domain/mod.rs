pub mod date;
pub mod entry;
pub mod favourite;

pub use date::{DateSelection, SelectedDate};
pub use entry::{BirthEntry, BirthPayload};
pub use favourite::{FavouriteEntry, FavouriteGroup, GroupedFavourites};
