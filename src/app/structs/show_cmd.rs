use crate::controller::result::ControllerError;

/// Display commands accepted by the platform `ShowWindow` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ShowCmd {
    Hide = 0,
    ShowNormal = 1,
    ShowMinimized = 2,
    ShowMaximized = 3,
    ShowNoActivate = 4,
    Show = 5,
    Minimize = 6,
    ShowMinNoActive = 7,
    ShowNa = 8,
    Restore = 9,
    ShowDefault = 10,
    ForceMinimize = 11,
}

impl ShowCmd {
    pub const ALL: [ShowCmd; 12] = [
        ShowCmd::Hide,
        ShowCmd::ShowNormal,
        ShowCmd::ShowMinimized,
        ShowCmd::ShowMaximized,
        ShowCmd::ShowNoActivate,
        ShowCmd::Show,
        ShowCmd::Minimize,
        ShowCmd::ShowMinNoActive,
        ShowCmd::ShowNa,
        ShowCmd::Restore,
        ShowCmd::ShowDefault,
        ShowCmd::ForceMinimize,
    ];

    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn is_hide(self) -> bool {
        self == ShowCmd::Hide
    }
}

impl TryFrom<i64> for ShowCmd {
    type Error = ControllerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        ShowCmd::ALL
            .into_iter()
            .find(|c| i64::from(c.value()) == value)
            .ok_or(ControllerError::InvalidShowCmd(value))
    }
}
