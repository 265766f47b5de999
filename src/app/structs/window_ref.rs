use std::fmt;

/// A native window handle, identified by its underlying address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowRef {
    pub addr: isize,
}

impl WindowRef {
    pub fn new(addr: isize) -> WindowRef {
        WindowRef { addr }
    }

    pub fn is_null(&self) -> bool {
        self.addr == 0
    }
}

impl From<isize> for WindowRef {
    fn from(addr: isize) -> Self {
        WindowRef::new(addr)
    }
}

impl From<WindowRef> for isize {
    fn from(window: WindowRef) -> Self {
        window.addr
    }
}

#[cfg(windows)]
impl From<windows::Win32::Foundation::HWND> for WindowRef {
    fn from(hwnd: windows::Win32::Foundation::HWND) -> Self {
        WindowRef::new(hwnd.0 as isize)
    }
}

#[cfg(windows)]
impl From<WindowRef> for windows::Win32::Foundation::HWND {
    fn from(window: WindowRef) -> Self {
        windows::Win32::Foundation::HWND(window.addr as *mut core::ffi::c_void)
    }
}

impl fmt::Display for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_by_address() {
        let a = WindowRef::new(0x1a2b);
        let b: WindowRef = 0x1a2b.into();
        assert_eq!(a, b);

        let set: HashSet<WindowRef> = [a, b, WindowRef::new(7)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_null_window() {
        assert!(WindowRef::default().is_null());
        assert!(!WindowRef::new(1).is_null());
        assert_eq!(WindowRef::new(4242).to_string(), "4242");
    }
}
