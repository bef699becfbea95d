#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Submit,
    NextFocus,
    PrevFocus,
    InsertChar(char),
    DeleteBackward,
    Noop,
}
