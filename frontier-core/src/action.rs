/// Every user interaction produces an Action. UI never directly calls git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Path field
    EditPath,
    StopEditing,
    ConfirmPath,
    CompletePath,

    // Text input (path field or path prompt)
    InputPush(char),
    InputPop,
    InputDelete,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,

    // Installer controls
    Install,
    Update,
    Status,
    OpenDir,
    Launch,
    NextBranch,
    PrevBranch,

    // Console scrollback
    ScrollConsoleUp,
    ScrollConsoleDown,

    // Dialogs
    Accept,
    Decline,
    DismissNotice,
}
