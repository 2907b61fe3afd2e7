use thiserror::Error;

use crate::click_loop::ClickRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Clicks,
    Interval,
    X,
    Y,
}

impl Field {
    fn message(self) -> &'static str {
        match self {
            Field::Clicks => "Invalid number of clicks",
            Field::Interval => "Invalid interval",
            Field::X => "Invalid X coordinate",
            Field::Y => "Invalid Y coordinate",
        }
    }

    fn allows_negative(self) -> bool { matches!(self, Field::X | Field::Y) }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .field.message())]
pub struct ParseError {
    pub field: Field,
    pub input: String,
}

/// Whole-string base-10 integer, surrounding whitespace ignored.
pub fn parse(field: Field, text: &str) -> Result<i32, ParseError> {
    let fail = || ParseError { field, input: text.to_owned() };
    let value: i32 = text.trim().parse().map_err(|_| fail())?;
    if value < 0 && !field.allows_negative() {
        return Err(fail());
    }
    Ok(value)
}

/// Raw text of the four input boxes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickForm {
    pub clicks: String,
    pub interval: String,
    pub x: String,
    pub y: String,
}

impl ClickForm {
    /// Fields are checked top to bottom; the first bad one wins.
    pub fn to_request(&self) -> Result<ClickRequest, ParseError> {
        Ok(ClickRequest {
            total_clicks: parse(Field::Clicks, &self.clicks)?,
            interval_millis: parse(Field::Interval, &self.interval)?,
            target_x: parse(Field::X, &self.x)?,
            target_y: parse(Field::Y, &self.y)?,
        })
    }
}
