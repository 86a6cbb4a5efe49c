#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};

use rota_rust::db::{EventRepository, LocalRepository, RosterRepository};
use rota_rust::models::{Event, Location, Position, Shift, Volunteer};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A seeded three-day event with two locations and two positions.
pub struct Stage {
    pub repo: LocalRepository,
    pub event: Event,
    pub main_hall: Location,
    pub terrace: Location,
    pub door: Position,
    pub bar: Position,
}

pub async fn stage() -> Stage {
    let repo = LocalRepository::new();

    let event = repo
        .create_event(Event::new("Rhythm Hop 2025", date(2025, 5, 1), date(2025, 5, 3)).unwrap())
        .await
        .unwrap();
    let event_id = event.id.unwrap();

    let main_hall = repo
        .create_location(Location::new(event_id, "Main hall"))
        .await
        .unwrap();
    let terrace = repo
        .create_location(Location::new(event_id, "Terrace"))
        .await
        .unwrap();

    let door = repo
        .create_position(Position::new(event_id, "Door"))
        .await
        .unwrap();
    let bar = repo
        .create_position(Position::new(event_id, "Bar"))
        .await
        .unwrap();

    Stage {
        repo,
        event,
        main_hall,
        terrace,
        door,
        bar,
    }
}

impl Stage {
    pub fn draft_shift(
        &self,
        location: &Location,
        position: &Position,
        day: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        max_volunteers: u32,
    ) -> Shift {
        Shift {
            id: None,
            event: self.event.id.unwrap(),
            location: location.id.unwrap(),
            date: day,
            start_time: start,
            end_time: end,
            position: position.id.unwrap(),
            max_volunteers,
            volunteer_count: 0,
            notes: String::new(),
        }
    }

    pub async fn add_volunteer(&self, first: &str, last: &str, email: &str) -> Volunteer {
        self.repo
            .create_volunteer(Volunteer::new(first, last, email))
            .await
            .unwrap()
    }
}
