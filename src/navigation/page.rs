use std::{fmt, str::FromStr};

use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};

/// Every screen the companion app can show. Exactly one is current.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    Profile,
    Notifications,
    AddLocation,
    LocationMap,
    InputDevice,
    Dashboard,
    MenuTask,
    TaskPraKompos,
    TaskAnorganik,
    TaskAi,
}

impl Default for Page {
    fn default() -> Self {
        Page::Home
    }
}

impl Page {
    pub const ALL: [Page; 11] = [
        Page::Home,
        Page::Profile,
        Page::Notifications,
        Page::AddLocation,
        Page::LocationMap,
        Page::InputDevice,
        Page::Dashboard,
        Page::MenuTask,
        Page::TaskPraKompos,
        Page::TaskAnorganik,
        Page::TaskAi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Profile => "profile",
            Page::Notifications => "notifications",
            Page::AddLocation => "add-location",
            Page::LocationMap => "location-map",
            Page::InputDevice => "input-device",
            Page::Dashboard => "dashboard",
            Page::MenuTask => "menu-task",
            Page::TaskPraKompos => "task-pra-kompos",
            Page::TaskAnorganik => "task-anorganik",
            Page::TaskAi => "task-ai",
        }
    }

    /// The screen each page's back arrow leads to when there is no history
    /// to pop. `Home` is the root and has none.
    pub fn predecessor(&self) -> Option<Page> {
        match self {
            Page::Home => None,
            Page::Profile | Page::Notifications | Page::AddLocation | Page::Dashboard => {
                Some(Page::Home)
            }
            Page::LocationMap => Some(Page::AddLocation),
            Page::InputDevice => Some(Page::LocationMap),
            Page::MenuTask => Some(Page::Dashboard),
            Page::TaskPraKompos | Page::TaskAnorganik | Page::TaskAi => Some(Page::MenuTask),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .iter()
            .copied()
            .find(|page| page.as_str() == value)
            .ok_or_else(|| anyhow!("unknown page '{value}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_page_name() {
        for page in Page::ALL {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), page);
        }
        assert!("settings".parse::<Page>().is_err());
    }

    #[test]
    fn serializes_as_kebab_case() {
        let json = serde_json::to_string(&Page::TaskPraKompos).unwrap();
        assert_eq!(json, "\"task-pra-kompos\"");
    }

    #[test]
    fn every_page_but_home_leads_back_towards_home() {
        for page in Page::ALL {
            let mut current = page;
            let mut hops = 0;
            while let Some(prev) = current.predecessor() {
                current = prev;
                hops += 1;
                assert!(hops < Page::ALL.len());
            }
            assert_eq!(current, Page::Home);
        }
    }
}
