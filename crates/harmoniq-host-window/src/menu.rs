//! Entries appended to the host window's system menu.

/// Host commands reachable from the system menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    OpenSettings,
    SaveState,
    LoadState,
    ResetState,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 4] = [
        MenuCommand::OpenSettings,
        MenuCommand::SaveState,
        MenuCommand::LoadState,
        MenuCommand::ResetState,
    ];

    /// Command identifier delivered with the system-command notification.
    pub const fn id(self) -> u32 {
        match self {
            MenuCommand::OpenSettings => 1001,
            MenuCommand::SaveState => 1002,
            MenuCommand::LoadState => 1003,
            MenuCommand::ResetState => 1004,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }

    pub const fn label(self) -> &'static str {
        match self {
            MenuCommand::OpenSettings => "Audio/MIDI Settings",
            MenuCommand::SaveState => "Save plugin state...",
            MenuCommand::LoadState => "Load plugin state...",
            MenuCommand::ResetState => "Reset to default plugin state",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Separator,
    Command(MenuCommand),
}

/// An entry and the system-menu position it is inserted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItemPlacement {
    pub position: u32,
    pub entry: MenuEntry,
}

/// Host entries inserted after the first system-menu item.
pub fn system_menu_layout() -> [MenuItemPlacement; 8] {
    use MenuEntry::{Command, Separator};
    let entries = [
        Separator,
        Command(MenuCommand::OpenSettings),
        Separator,
        Command(MenuCommand::SaveState),
        Command(MenuCommand::LoadState),
        Separator,
        Command(MenuCommand::ResetState),
        Separator,
    ];
    let mut position = 0;
    entries.map(|entry| {
        position += 1;
        MenuItemPlacement { position, entry }
    })
}
