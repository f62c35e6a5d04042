/// Application actions representing all possible state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Navigation
    NextTab,
    PrevTab,
    Up,
    Down,

    // Input modes
    EnterInsert,
    EnterNormal,
    NextField,

    // Form
    SubmitTransaction,

    // List
    DeleteSelected,

    // Filters
    ApplyFilters,
    ResetFilters,
    CycleTypeFilter,

    // Text input
    InputChar(char),
    InputBackspace,

    // Overlays
    ToggleHelp,
    DismissAlert,
}
