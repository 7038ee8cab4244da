pub use nix::libc::pid_t;

use super::geometry::Rect;

/// One on-screen window as reported by the window server.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowServerInfo {
    pub owner_name: String,
    pub title: String,
    pub pid: pid_t,
    /// Top-left-origin bounds in global coordinates.
    pub bounds: Rect,
}

/// Source of the live window list.
pub trait WindowServer {
    fn visible_windows(&self) -> Vec<WindowServerInfo>;
}

#[cfg(target_os = "macos")]
pub use self::macos::Actual;

#[cfg(target_os = "macos")]
mod macos {
    use std::ptr::NonNull;

    use objc2::rc::Retained;
    use objc2::runtime::{AnyClass, AnyObject};
    use objc2::{Message, class, msg_send};
    use objc2_core_foundation::CFRetained;
    use objc2_core_graphics::{CGWindowID, CGWindowListCopyWindowInfo, CGWindowListOption};
    use objc2_foundation::{NSArray, NSDictionary, NSNumber, NSString, ns_string};
    use tracing::{trace, warn};

    use super::{WindowServer, WindowServerInfo};
    use crate::sys::geometry::Rect;

    const NULL_WINDOW: CGWindowID = 0;

    type WindowDict = NSDictionary<NSString, AnyObject>;

    pub struct Actual;

    impl WindowServer for Actual {
        fn visible_windows(&self) -> Vec<WindowServerInfo> {
            let Some(list) = get_visible_windows_raw() else {
                warn!("CGWindowListCopyWindowInfo returned no window list");
                return Vec::new();
            };
            list.iter().filter_map(|win| make_info(&win)).collect()
        }
    }

    fn get_visible_windows_raw() -> Option<Retained<NSArray<WindowDict>>> {
        let list = unsafe {
            CGWindowListCopyWindowInfo(
                CGWindowListOption::OptionOnScreenOnly | CGWindowListOption::ExcludeDesktopElements,
                NULL_WINDOW,
            )
        }?;
        // CFArray and NSArray are toll-free bridged. The NSArray view takes
        // its own reference; `list` releases the copy when dropped.
        let ptr: NonNull<NSArray<WindowDict>> = CFRetained::as_ptr(&list).cast();
        unsafe { Retained::retain(ptr.as_ptr()) }
    }

    fn make_info(win: &WindowDict) -> Option<WindowServerInfo> {
        let owner_name = get_string(win, ns_string!("kCGWindowOwnerName"))?;
        let Some(title) = get_string(win, ns_string!("kCGWindowName")).filter(|t| !t.is_empty())
        else {
            trace!("skipping untitled window of {owner_name}");
            return None;
        };
        let pid = get_num(win, ns_string!("kCGWindowOwnerPID"))? as i32;

        let bounds = win.objectForKey(ns_string!("kCGWindowBounds"))?;
        let bounds: &WindowDict = downcast(&bounds, class!(NSDictionary))?;
        let rect = Rect::new(
            get_num(bounds, ns_string!("X"))?,
            get_num(bounds, ns_string!("Y"))?,
            get_num(bounds, ns_string!("Width"))?,
            get_num(bounds, ns_string!("Height"))?,
        );

        Some(WindowServerInfo {
            owner_name,
            title,
            pid,
            bounds: rect,
        })
    }

    fn downcast<'a, T: Message>(obj: &'a AnyObject, cls: &AnyClass) -> Option<&'a T> {
        let is_kind: bool = unsafe { msg_send![obj, isKindOfClass: cls] };
        is_kind.then(|| unsafe { &*(obj as *const AnyObject).cast::<T>() })
    }

    fn get_string(dict: &WindowDict, key: &NSString) -> Option<String> {
        let item = dict.objectForKey(key)?;
        downcast::<NSString>(&item, class!(NSString)).map(|s| s.to_string())
    }

    fn get_num(dict: &WindowDict, key: &NSString) -> Option<f64> {
        let item = dict.objectForKey(key)?;
        downcast::<NSNumber>(&item, class!(NSNumber)).map(|n| n.as_f64())
    }
}
