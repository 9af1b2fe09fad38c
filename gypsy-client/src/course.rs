use crate::{signals::CourseChanged, Bus, Result};
use bitflags::bitflags;
use dbus::{channel::Token, Path};
use gypsy_utils::{GYPSY_COURSE_INTERFACE, UNSET_SENTINEL};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CourseFields: i32 {
        const SPEED = 1 << 0;
        const DIRECTION = 1 << 1;
        const CLIMB = 1 << 2;
    }
}

impl Default for CourseFields {
    fn default() -> Self {
        CourseFields::empty()
    }
}

/// Speed (knots), direction (degrees from true north) and climb rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Course {
    pub fields: CourseFields,
    pub timestamp: i32,
    pub speed: f64,
    pub direction: f64,
    pub climb: f64,
}

impl Course {
    pub fn speed(&self) -> Option<f64> {
        self.fields.contains(CourseFields::SPEED).then_some(self.speed)
    }

    pub fn direction(&self) -> Option<f64> {
        self.fields
            .contains(CourseFields::DIRECTION)
            .then_some(self.direction)
    }

    pub fn climb(&self) -> Option<f64> {
        self.fields.contains(CourseFields::CLIMB).then_some(self.climb)
    }

    /// Speed, direction and climb, `-1.0` for the unset ones.
    pub fn or_sentinel(&self) -> (f64, f64, f64) {
        (
            self.speed().unwrap_or(UNSET_SENTINEL),
            self.direction().unwrap_or(UNSET_SENTINEL),
            self.climb().unwrap_or(UNSET_SENTINEL),
        )
    }
}

impl From<CourseChanged> for Course {
    fn from(signal: CourseChanged) -> Self {
        Course {
            fields: CourseFields::from_bits_truncate(signal.fields_set),
            timestamp: signal.timestamp,
            speed: signal.speed,
            direction: signal.direction,
            climb: signal.climb,
        }
    }
}

impl From<Course> for CourseChanged {
    fn from(course: Course) -> Self {
        CourseChanged {
            fields_set: course.fields.bits(),
            timestamp: course.timestamp,
            speed: course.speed,
            direction: course.direction,
            climb: course.climb,
        }
    }
}

pub struct CourseProxy<'a, B: Bus> {
    bus: &'a B,
    path: Path<'static>,
}

impl<'a, B: Bus> CourseProxy<'a, B> {
    pub fn new(bus: &'a B, path: Path<'static>) -> Self {
        CourseProxy { bus, path }
    }

    pub fn course(&self) -> Result<Course> {
        let signal: CourseChanged =
            self.bus
                .call(&self.path, GYPSY_COURSE_INTERFACE, "GetCourse", ())?;
        Ok(signal.into())
    }

    pub fn on_course_changed<F>(&self, mut f: F) -> Result<Token>
    where
        F: FnMut(Course) + Send + 'static,
    {
        self.bus
            .subscribe(Some(&self.path), move |signal: CourseChanged| {
                f(signal.into());
                true
            })
    }
}
