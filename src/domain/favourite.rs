use serde::{Deserialize, Serialize};

use crate::domain::SelectedDate;

/// A favourite, remembered under the date that was selected when it was marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteEntry {
    pub date: SelectedDate,
    pub text: String,
}

impl FavouriteEntry {
    pub fn new(date: SelectedDate, text: impl Into<String>) -> Self {
        Self {
            date,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteGroup {
    pub date: SelectedDate,
    pub texts: Vec<String>,
}

/// Favourites grouped by date.
///
/// Groups appear in the order their date first shows up in the favourites
/// list; texts keep favourites-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedFavourites {
    groups: Vec<FavouriteGroup>,
}

impl GroupedFavourites {
    pub fn from_favourites(favourites: &[FavouriteEntry]) -> Self {
        let groups = favourites
            .iter()
            .fold(Vec::<FavouriteGroup>::new(), |mut groups, favourite| {
                match groups.iter_mut().find(|g| g.date == favourite.date) {
                    Some(group) => group.texts.push(favourite.text.clone()),
                    None => groups.push(FavouriteGroup {
                        date: favourite.date.clone(),
                        texts: vec![favourite.text.clone()],
                    }),
                }
                groups
            });

        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn get(&self, date: &SelectedDate) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| &g.date == date)
            .map(|g| g.texts.as_slice())
    }

    /// Lines needed to list every group: a heading per date, one line per
    /// text, and a blank line between groups.
    pub fn line_count(&self) -> usize {
        let texts: usize = self.groups.iter().map(|g| g.texts.len()).sum();
        self.groups.len() + texts + self.groups.len().saturating_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavouriteGroup> {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fav(date: &str, text: &str) -> FavouriteEntry {
        FavouriteEntry::new(SelectedDate::new(date), text)
    }

    #[test]
    fn test_empty_favourites() {
        let grouped = GroupedFavourites::from_favourites(&[]);
        assert!(grouped.is_empty());
        assert_eq!(grouped.len(), 0);
    }

    #[test]
    fn test_groups_by_date_in_first_seen_order() {
        let favourites = vec![
            fav("March 14", "Albert Einstein"),
            fav("January 05", "Ada"),
            fav("March 14", "Michael Caine"),
            fav("January 05", "Someone Else"),
        ];
        let grouped = GroupedFavourites::from_favourites(&favourites);

        let dates: Vec<&str> = grouped.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, vec!["March 14", "January 05"]);
        assert_eq!(
            grouped.get(&SelectedDate::new("March 14")).unwrap(),
            ["Albert Einstein", "Michael Caine"]
        );
        assert_eq!(
            grouped.get(&SelectedDate::new("January 05")).unwrap(),
            ["Ada", "Someone Else"]
        );
    }

    #[test]
    fn test_line_count() {
        assert_eq!(GroupedFavourites::default().line_count(), 0);

        let one = GroupedFavourites::from_favourites(&[fav("May 01", "a")]);
        assert_eq!(one.line_count(), 2);

        let favourites = vec![fav("May 01", "a"), fav("May 02", "b"), fav("May 01", "c")];
        // two headings, three texts, one blank separator
        assert_eq!(GroupedFavourites::from_favourites(&favourites).line_count(), 6);
    }

    #[test]
    fn test_every_date_present_and_no_extra_keys() {
        let favourites = vec![fav("May 01", "a"), fav("May 02", "b"), fav("May 01", "c")];
        let grouped = GroupedFavourites::from_favourites(&favourites);

        assert_eq!(grouped.len(), 2);
        for favourite in &favourites {
            assert!(grouped
                .get(&favourite.date)
                .unwrap()
                .contains(&favourite.text));
        }
        assert!(grouped.get(&SelectedDate::new("May 03")).is_none());
        let total: usize = grouped.iter().map(|g| g.texts.len()).sum();
        assert_eq!(total, favourites.len());
    }
}
