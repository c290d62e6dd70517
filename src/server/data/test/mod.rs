mod master;
mod service;

use chrono::{NaiveDate, NaiveTime};
use entity::prelude::*;
use rust_decimal::Decimal;
use test_utils::{builder::TestBuilder, factory};

use crate::server::error::AppError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
