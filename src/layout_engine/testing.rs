//! In-memory stand-ins for the display, window server and accessibility
//! providers.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::model::{SavedWindow, TitleMatcher};
use crate::sys::axuielement::{Accessibility, AxWindow, Error};
use crate::sys::geometry::{Point, Rect, Size};
use crate::sys::screen::{ScreenId, ScreenInfo, System};
use crate::sys::window_server::{WindowServer, WindowServerInfo, pid_t};

pub fn screen(id: u32, x: f64, y: f64, w: f64, h: f64) -> ScreenInfo {
    ScreenInfo {
        id: ScreenId(id),
        name: format!("Display {id}"),
        frame: Rect::new(x, y, w, h),
    }
}

pub fn live_window(owner: &str, title: &str, pid: pid_t, bounds: Rect) -> WindowServerInfo {
    WindowServerInfo {
        owner_name: owner.to_string(),
        title: title.to_string(),
        pid,
        bounds,
    }
}

pub fn saved_window(owner: &str, pattern: &str, exact: bool, display: u32, frame: Rect) -> SavedWindow {
    SavedWindow {
        owner_name: owner.to_string(),
        title: TitleMatcher::new(pattern, exact).unwrap(),
        display_id: ScreenId(display),
        frame,
    }
}

pub struct FakeSystem(pub Vec<ScreenInfo>);

impl System for FakeSystem {
    fn screens(&self) -> Vec<ScreenInfo> { self.0.clone() }
}

pub struct FakeWindowServer(pub Vec<WindowServerInfo>);

impl WindowServer for FakeWindowServer {
    fn visible_windows(&self) -> Vec<WindowServerInfo> { self.0.clone() }
}

/// A write attempted through a fake handle, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Position(String, Point),
    Size(String, Size),
}

#[derive(Debug, Default)]
struct HandleState {
    title: String,
    frame: Rect,
    title_error: Option<Error>,
    position_error: Option<Error>,
    size_error: Option<Error>,
}

#[derive(Debug, Clone)]
pub struct FakeWindow {
    state: Rc<RefCell<HandleState>>,
    writes: Rc<RefCell<Vec<Write>>>,
}

impl FakeWindow {
    pub fn frame(&self) -> Rect { self.state.borrow().frame }

    pub fn fail_title(&self, err: Error) -> &Self {
        self.state.borrow_mut().title_error = Some(err);
        self
    }

    pub fn fail_set_position(&self, err: Error) -> &Self {
        self.state.borrow_mut().position_error = Some(err);
        self
    }

    pub fn fail_set_size(&self, err: Error) -> &Self {
        self.state.borrow_mut().size_error = Some(err);
        self
    }
}

impl AxWindow for FakeWindow {
    fn title(&self) -> Result<String, Error> {
        let state = self.state.borrow();
        match state.title_error {
            Some(err) => Err(err),
            None => Ok(state.title.clone()),
        }
    }

    fn position(&self) -> Result<Point, Error> { Ok(self.state.borrow().frame.origin) }

    fn size(&self) -> Result<Size, Error> { Ok(self.state.borrow().frame.size) }

    fn set_position(&self, pos: Point) -> Result<(), Error> {
        let mut state = self.state.borrow_mut();
        self.writes.borrow_mut().push(Write::Position(state.title.clone(), pos));
        if let Some(err) = state.position_error {
            return Err(err);
        }
        state.frame.origin = pos;
        Ok(())
    }

    fn set_size(&self, size: Size) -> Result<(), Error> {
        let mut state = self.state.borrow_mut();
        self.writes.borrow_mut().push(Write::Size(state.title.clone(), size));
        if let Some(err) = state.size_error {
            return Err(err);
        }
        state.frame.size = size;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeAx {
    windows: RefCell<BTreeMap<pid_t, Vec<FakeWindow>>>,
    query_errors: RefCell<BTreeMap<pid_t, Error>>,
    writes: Rc<RefCell<Vec<Write>>>,
}

impl FakeAx {
    pub fn add_window(&self, pid: pid_t, title: &str, frame: Rect) -> FakeWindow {
        let window = FakeWindow {
            state: Rc::new(RefCell::new(HandleState {
                title: title.to_string(),
                frame,
                ..Default::default()
            })),
            writes: self.writes.clone(),
        };
        self.windows.borrow_mut().entry(pid).or_default().push(window.clone());
        window
    }

    pub fn fail_query(&self, pid: pid_t, err: Error) {
        self.query_errors.borrow_mut().insert(pid, err);
    }

    pub fn writes(&self) -> Vec<Write> { self.writes.borrow().clone() }
}

impl Accessibility for FakeAx {
    type Window = FakeWindow;

    fn windows(&self, pid: pid_t) -> Result<Vec<FakeWindow>, Error> {
        if let Some(err) = self.query_errors.borrow().get(&pid) {
            return Err(*err);
        }
        Ok(self.windows.borrow().get(&pid).cloned().unwrap_or_default())
    }
}
