#[cfg(test)]
mod tests {
    use crate::{Error, ErrorCode, VoteRecord, Voter};
    use serde_json::{json, Value};
    use time::macros::datetime;

    fn voter() -> Voter {
        Voter::new(1, "Ann", "a@x.com")
            .with_record(VoteRecord::new(2, 2, datetime!(2023-11-01 12:30:15.5 UTC)))
    }

    #[test]
    fn test_document_field_names() {
        let doc = serde_json::to_value(voter()).unwrap();
        assert_eq!(doc["voter_id"], 1);
        assert_eq!(doc["name"], "Ann");
        assert_eq!(doc["email"], "a@x.com");
        assert_eq!(doc["vote_history"][0]["poll_id"], 2);
        assert_eq!(doc["vote_history"][0]["vote_id"], 2);
        assert_eq!(doc["vote_history"][0]["vote_date"], "2023-11-01T12:30:15.5Z");
    }

    #[test]
    fn test_document_decodes_foreign_offset() {
        let doc = json!({
            "voter_id": 7,
            "name": "Bo",
            "email": "b@x.com",
            "vote_history": [
                { "poll_id": 1, "vote_id": 9, "vote_date": "2023-11-01T08:30:15.5-04:00" }
            ]
        });
        let v: Voter = serde_json::from_value(doc).unwrap();
        assert_eq!(v.vote_history[0].vote_date, datetime!(2023-11-01 12:30:15.5 UTC));
    }

    #[test]
    fn test_missing_history_defaults_to_empty() {
        let v: Voter = serde_json::from_str(r#"{"voter_id":3,"name":"C","email":"c@x.com"}"#).unwrap();
        assert!(v.vote_history.is_empty());
        assert_eq!(v, Voter::new(3, "C", "c@x.com"));
    }

    #[test]
    fn test_null_history_decodes_as_empty() {
        let v: Voter = serde_json::from_str(
            r#"{"voter_id":3,"name":"C","email":"c@x.com","vote_history":null}"#,
        ).unwrap();
        assert_eq!(v, Voter::new(3, "C", "c@x.com"));
        assert_eq!(serde_json::to_value(&v).unwrap()["vote_history"], json!([]));
    }

    #[test]
    fn test_negative_id_rejected() {
        let res: Result<Voter, _> = serde_json::from_str(r#"{"voter_id":-1,"name":"C","email":"c@x.com"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_history_keeps_order_and_duplicates() {
        let t = datetime!(2024-01-01 0:00 UTC);
        let v = Voter::new(1, "A", "a@x.com")
            .with_record(VoteRecord::new(5, 1, t))
            .with_record(VoteRecord::new(3, 2, t))
            .with_record(VoteRecord::new(5, 3, t));

        let text = serde_json::to_string(&v).unwrap();
        let back: Voter = serde_json::from_str(&text).unwrap();
        let polls: Vec<u64> = back.vote_history.iter().map(|r| r.poll_id).collect();
        assert_eq!(polls, vec![5, 3, 5]);
        assert_eq!(back.poll(5).unwrap().vote_id, 1);
    }

    #[test]
    fn test_poll_helpers() {
        let t = datetime!(2024-01-01 0:00 UTC);
        let mut v = Voter::new(1, "A", "a@x.com")
            .with_record(VoteRecord::new(5, 1, t))
            .with_record(VoteRecord::new(6, 2, t));

        v.poll_mut(6).unwrap().vote_id = 20;
        assert_eq!(v.poll(6).unwrap().vote_id, 20);

        assert_eq!(v.remove_poll(5).map(|r| r.vote_id), Some(1));
        assert!(v.remove_poll(5).is_none());
        assert_eq!(v.vote_history.len(), 1);
    }

    #[test]
    fn test_error_envelope() {
        let err = Error::with_details(ErrorCode::NotFound, "Voter not found", "voter:9");
        assert_eq!(err.to_string(), "Resource not found: Voter not found (voter:9)");

        let doc: Value = serde_json::to_value(Error::new(ErrorCode::InvalidInput, "bad id")).unwrap();
        assert_eq!(doc["code"], "invalidInput");
        assert!(doc.get("details").is_none());

        assert_eq!(ErrorCode::NotFound.status_code(), 404);
        assert_eq!(ErrorCode::Conflict.status_code(), 500);
    }
}
