//! Accessibility trust for this process.
//!
//! Moving another application's windows requires the user to list relayout
//! under Privacy & Security > Accessibility. Reading window titles and
//! frames through the accessibility API needs the same grant, so without it
//! every window ends up unconfirmed or failed.

use std::ffi::c_void;
use std::time::{Duration, Instant};
use std::{ptr, thread};

use objc2::rc::autoreleasepool;
use objc2::runtime::AnyObject;
use objc2::{class, msg_send};
use tracing::{debug, info, warn};

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrustedWithOptions(options: *const c_void) -> bool;

    static kAXTrustedCheckOptionPrompt: *const c_void;
}

#[link(name = "CoreFoundation", kind = "framework")]
unsafe extern "C" {
    static kCFBooleanTrue: *const c_void;
}

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn is_trusted() -> bool { unsafe { AXIsProcessTrustedWithOptions(ptr::null()) } }

/// Asks the system to show its "grant accessibility access" dialog.
///
/// Returns the trust state at the time of asking; the user answers later.
fn request_trust() -> bool {
    autoreleasepool(|_| unsafe {
        let keys = [kAXTrustedCheckOptionPrompt as *mut AnyObject];
        let values = [kCFBooleanTrue as *mut AnyObject];
        let options: *mut AnyObject = msg_send![
            class!(NSDictionary),
            dictionaryWithObjects: values.as_ptr(),
            forKeys: keys.as_ptr(),
            count: 1usize
        ];
        AXIsProcessTrustedWithOptions(options.cast())
    })
}

fn wait_for_trust(wait: Duration) -> bool {
    let deadline = Instant::now() + wait;
    while Instant::now() < deadline {
        if is_trusted() {
            return true;
        }
        thread::sleep(POLL_INTERVAL);
    }
    is_trusted()
}

/// Makes sure relayout may drive other applications' windows.
///
/// If trust is missing the user is prompted once, then given up to `wait` to
/// flip the switch. A restore still runs when this returns false; its window
/// reads and writes will fail one by one and show up in the report.
pub fn check_accessibility_permission(wait: Duration) -> bool {
    if is_trusted() {
        debug!("accessibility access already granted");
        return true;
    }

    info!("relayout needs accessibility access; asking for it now");
    if request_trust() || wait_for_trust(wait) {
        info!("accessibility access granted");
        return true;
    }

    warn!(
        "relayout does not have accessibility permission. Enable it in System Settings > Privacy & Security > Accessibility, then run it again."
    );
    false
}
