//! Accessibility handles for reading and writing window geometry.
//!
//! The window server can list every window but cannot move them; the
//! accessibility API can move windows but only enumerates them per process.

use thiserror::Error;

use super::geometry::{Point, Size};
use super::window_server::pid_t;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("accessibility call failed with AXError {0}")]
    Ax(i32),
    #[error("attribute value has an unexpected type")]
    WrongType,
}

/// A window handle owned by the accessibility layer.
pub trait AxWindow {
    fn title(&self) -> Result<String, Error>;
    fn position(&self) -> Result<Point, Error>;
    fn size(&self) -> Result<Size, Error>;
    fn set_position(&self, pos: Point) -> Result<(), Error>;
    fn set_size(&self, size: Size) -> Result<(), Error>;
}

pub trait Accessibility {
    type Window: AxWindow;

    /// All accessibility windows of the process `pid`.
    fn windows(&self, pid: pid_t) -> Result<Vec<Self::Window>, Error>;
}

#[cfg(target_os = "macos")]
pub use self::macos::{AXUIElement, Actual};

#[cfg(target_os = "macos")]
mod macos {
    use std::ffi::c_void;
    use std::ptr::{self, NonNull};

    use objc2::rc::Retained;
    use objc2::runtime::AnyObject;
    use objc2_application_services::{AXError, AXUIElement as RawElement, AXValue, AXValueType};
    use objc2_core_foundation::{CFRetained, CFString, CFType, CGPoint, CGSize};
    use objc2_foundation::NSArray;

    use super::{Accessibility, AxWindow, Error};
    use crate::sys::geometry::{Point, Size};
    use crate::sys::window_server::pid_t;

    impl From<AXError> for Error {
        fn from(code: AXError) -> Self { Error::Ax(code.0) }
    }

    fn check(code: AXError) -> Result<(), Error> {
        if code == AXError::Success { Ok(()) } else { Err(code.into()) }
    }

    /// An accessibility element for an application or one of its windows.
    pub struct AXUIElement(CFRetained<RawElement>);

    impl AXUIElement {
        pub fn application(pid: pid_t) -> AXUIElement {
            AXUIElement(unsafe { RawElement::new_application(pid) })
        }

        fn copy_attribute(&self, name: &str) -> Result<CFRetained<CFType>, Error> {
            let name = CFString::from_str(name);
            let mut value: *const CFType = ptr::null();
            check(unsafe { self.0.copy_attribute_value(&name, NonNull::from(&mut value)) })?;
            NonNull::new(value.cast_mut())
                .map(|value| unsafe { CFRetained::from_raw(value) })
                .ok_or(Error::WrongType)
        }

        fn set_attribute(&self, name: &str, value: &CFType) -> Result<(), Error> {
            let name = CFString::from_str(name);
            check(unsafe { self.0.set_attribute_value(&name, value) })
        }

        fn children_windows(&self) -> Result<Vec<AXUIElement>, Error> {
            let array = self.copy_attribute("AXWindows")?;
            // CFArray is toll-free bridged to NSArray.
            let ptr = CFRetained::as_ptr(&array).cast::<NSArray<AnyObject>>();
            let Some(array) = (unsafe { Retained::retain(ptr.as_ptr()) }) else {
                return Err(Error::WrongType);
            };
            Ok(array
                .iter()
                .map(|item| {
                    let ptr = NonNull::from(&*item).cast::<RawElement>();
                    AXUIElement(unsafe { CFRetained::retain(ptr) })
                })
                .collect())
        }

        fn get_value<T>(&self, name: &str, value_type: AXValueType, mut out: T) -> Result<T, Error> {
            let value = self.copy_attribute(name)?;
            let value = value.downcast_ref::<AXValue>().ok_or(Error::WrongType)?;
            let ok = unsafe { value.value(value_type, NonNull::from(&mut out).cast::<c_void>()) };
            if ok { Ok(out) } else { Err(Error::WrongType) }
        }

        fn set_value<T>(&self, name: &str, value_type: AXValueType, value: &T) -> Result<(), Error> {
            let value = unsafe { AXValue::new(value_type, NonNull::from(value).cast::<c_void>()) }
                .ok_or(Error::WrongType)?;
            self.set_attribute(name, &value)
        }
    }

    impl AxWindow for AXUIElement {
        fn title(&self) -> Result<String, Error> {
            let value = self.copy_attribute("AXTitle")?;
            value
                .downcast_ref::<CFString>()
                .map(|title| title.to_string())
                .ok_or(Error::WrongType)
        }

        fn position(&self) -> Result<Point, Error> {
            let p = self.get_value("AXPosition", AXValueType::CGPoint, CGPoint::ZERO)?;
            Ok(Point::new(p.x, p.y))
        }

        fn size(&self) -> Result<Size, Error> {
            let s = self.get_value("AXSize", AXValueType::CGSize, CGSize::new(0.0, 0.0))?;
            Ok(Size::new(s.width, s.height))
        }

        fn set_position(&self, pos: Point) -> Result<(), Error> {
            self.set_value("AXPosition", AXValueType::CGPoint, &CGPoint::new(pos.x, pos.y))
        }

        fn set_size(&self, size: Size) -> Result<(), Error> {
            self.set_value("AXSize", AXValueType::CGSize, &CGSize::new(size.width, size.height))
        }
    }

    pub struct Actual;

    impl Accessibility for Actual {
        type Window = AXUIElement;

        fn windows(&self, pid: pid_t) -> Result<Vec<AXUIElement>, Error> {
            AXUIElement::application(pid).children_windows()
        }
    }

    #[cfg(test)]
    mod tests {
        use pretty_assertions::assert_eq;
        use test_log::test;

        use super::*;

        #[test]
        fn it_maps_ax_error_codes() {
            assert_eq!(check(AXError::Success), Ok(()));
            assert_eq!(check(AXError::CannotComplete), Err(Error::Ax(-25204)));
            assert_eq!(Error::from(AXError::APIDisabled), Error::Ax(-25211));
        }
    }
}
