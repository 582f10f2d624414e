use anyhow::Result;
use async_trait::async_trait;

use club_data::{Event, EventFilter, Insert, Query, Retrieve};

use crate::{
    results::StoreError,
    store::{generate_id, keys},
    Store,
};

#[async_trait]
impl Query<Event> for Store {
    type Filter = EventFilter;
    /// Query events in calendar order.
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Event>> {
        let events: Vec<Event> = self.load(keys::EVENTS).await;
        let mut events: Vec<Event> = events
            .into_iter()
            .filter(|e| filter.id.as_ref().map_or(true, |id| &e.id == id))
            .filter(|e| filter.kind.map_or(true, |kind| e.kind == kind))
            .collect();
        events.sort_by(|a, b| (a.date, a.time.clone()).cmp(&(b.date, b.time.clone())));
        Ok(events)
    }
}

#[async_trait]
impl Retrieve<Event> for Store {
    type Key = String;
    async fn retrieve(&self, event_id: Self::Key) -> Result<Event> {
        let filter = EventFilter {
            id: Some(event_id),
            ..Default::default()
        };
        let event = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(StoreError::NotFound("event"))?;
        Ok(event)
    }
}

#[async_trait]
impl Insert<Event> for Store {
    /// Insert an event. A fresh event always starts without attendees.
    async fn insert(&self, event: Event) -> Result<Event> {
        let mut event = event;
        if event.id.is_empty() {
            event.id = generate_id();
        }
        event.attendees = Vec::new();

        let mut events: Vec<Event> = self.load(keys::EVENTS).await;
        events.insert(0, event.clone());
        self.save(keys::EVENTS, &events).await?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use club_data::EventKind;

    #[tokio::test]
    async fn test_event_insert_clears_attendees() {
        let store = Store::open_test();
        let event = store
            .insert(Event {
                title: "Net Practice".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 7, 6).unwrap(),
                time: "18:30".to_string(),
                kind: EventKind::Training,
                attendees: vec!["member1".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(!event.id.is_empty());
        assert!(event.attendees.is_empty());
    }

    #[tokio::test]
    async fn test_event_query_sorted_by_date() {
        let store = Store::open_test();
        for (title, month) in [("Later", 9), ("Sooner", 7), ("Middle", 8)] {
            store
                .insert(Event {
                    title: title.to_string(),
                    date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let events: Vec<Event> = store.query(&EventFilter::default()).await.unwrap();
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Sooner", "Middle", "Later"]);
    }

    #[tokio::test]
    async fn test_event_retrieve_not_found() {
        let store = Store::open_test();
        let result: Result<Event> = store.retrieve("missing".to_string()).await;
        assert!(result.is_err());
    }
}
