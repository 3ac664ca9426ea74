mod create_tag_tests {
    use crate::model::error::tag_errors::CreateTagError;
    use crate::tags::store::TagStore;
    use crate::tags::TagPayload;
    use crate::test::{tag_payload, tag_payload_with_params};

    #[test]
    fn create_then_get_matches_payload() {
        let store = TagStore::new();
        let payload = tag_payload_with_params("users", &["id", "name"]);
        let id = store.create(payload.clone()).unwrap();
        let tag = store.get_by_id(id).unwrap();
        assert_eq!(id, tag.id);
        assert!(tag.params.iter().all(|param| param.tag_id == id));
        // everything except the assigned ids comes back as it was sent
        let mut round_trip = TagPayload::from(&tag);
        round_trip.params.iter_mut().for_each(|param| param.id = None);
        assert_eq!(payload, round_trip);
    }

    #[test]
    fn create_assigns_fresh_param_ids() {
        let store = TagStore::new();
        let mut payload = tag_payload_with_params("users", &["id", "name"]);
        payload.params[0].id = Some(77);
        let first = store.create(payload.clone()).unwrap();
        let second = store.create(payload).unwrap();
        let param_ids = |id: u32| -> Vec<u32> {
            store.get_by_id(id).unwrap().params.iter().map(|p| p.id).collect()
        };
        assert_eq!(vec![1, 2], param_ids(first));
        assert_eq!(vec![3, 4], param_ids(second));
    }

    #[test]
    fn create_ignores_repeated_param_ids() {
        let store = TagStore::new();
        let mut payload = tag_payload_with_params("users", &["id", "name"]);
        payload.params[0].id = Some(5);
        payload.params[1].id = Some(5);
        let id = store.create(payload).unwrap();
        let param_ids: Vec<u32> = store
            .get_by_id(id)
            .unwrap()
            .params
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(vec![1, 2], param_ids);
    }

    #[test]
    fn create_invalid_does_not_mutate() {
        let store = TagStore::new();
        let res = store.create(tag_payload("a"));
        assert!(matches!(res, Err(CreateTagError::Validation(_))));
        assert!(store.list().is_empty());
        // a rejected payload doesn't use up a tag id
        assert_eq!(1, store.create(tag_payload("ab")).unwrap());
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let store = TagStore::new();
        let first = store.create(tag_payload("same")).unwrap();
        let second = store.create(tag_payload("same")).unwrap();
        assert_ne!(first, second);
        assert_eq!(2, store.list().len());
    }
}

mod list_tag_tests {
    use crate::tags::store::TagStore;
    use crate::test::tag_payload;

    #[test]
    fn list_returns_creation_order() {
        let store = TagStore::new();
        let ids: Vec<u32> = ["first", "second", "third"]
            .iter()
            .map(|name| store.create(tag_payload(name)).unwrap())
            .collect();
        let tags = store.list();
        assert_eq!(3, tags.len());
        assert_eq!(ids, tags.iter().map(|t| t.id).collect::<Vec<u32>>());
        assert_eq!(
            vec!["first", "second", "third"],
            tags.iter().map(|t| t.tag.as_str()).collect::<Vec<&str>>()
        );
    }

    #[test]
    fn list_is_a_snapshot() {
        let store = TagStore::new();
        let id = store.create(tag_payload("users")).unwrap();
        let mut tags = store.list();
        tags[0].tag = "changed".to_string();
        tags.clear();
        assert_eq!("users", store.get_by_id(id).unwrap().tag);
        assert_eq!(1, store.list().len());
    }

    #[test]
    fn get_by_id_missing_is_none() {
        let store = TagStore::new();
        assert_eq!(None, store.get_by_id(1));
    }
}

mod update_tag_tests {
    use crate::model::error::tag_errors::{UpdateTagError, ValidationError};
    use crate::tags::store::TagStore;
    use crate::tags::ParamPayload;
    use crate::test::{param_payload, tag_payload, tag_payload_with_params};

    #[test]
    fn update_not_found() {
        let store = TagStore::new();
        let res = store.update(1, tag_payload("users"));
        assert_eq!(Err(UpdateTagError::TagNotFound), res);
    }

    #[test]
    fn update_not_found_wins_over_validation() {
        let store = TagStore::new();
        let res = store.update(1, tag_payload("x"));
        assert_eq!(Err(UpdateTagError::TagNotFound), res);
    }

    #[test]
    fn update_reconciles_params() {
        let store = TagStore::new();
        let id = store
            .create(tag_payload_with_params("users", &["id", "name", "email"]))
            .unwrap();
        let existing = store.get_by_id(id).unwrap();
        // keep and edit "name", drop "id" and "email", add "age"
        let mut kept = ParamPayload::from(&existing.params[1]);
        kept.display_name = "Full name".to_string();
        let mut payload = tag_payload("people");
        payload.params = vec![kept, param_payload("age")];
        store.update(id, payload).unwrap();

        let updated = store.get_by_id(id).unwrap();
        assert_eq!("people", updated.tag);
        assert_eq!(2, updated.params.len());
        assert_eq!(existing.params[1].id, updated.params[0].id);
        assert_eq!("Full name", updated.params[0].display_name);
        // param ids are never reused, so the new one is past everything handed out so far
        assert_eq!(4, updated.params[1].id);
        assert!(updated.params.iter().all(|p| p.tag_id == id));
        assert!(!updated.params.iter().any(|p| p.id == existing.params[0].id));
    }

    #[test]
    fn update_rejects_foreign_param_id() {
        let store = TagStore::new();
        let first = store.create(tag_payload_with_params("first", &["a"])).unwrap();
        let second = store.create(tag_payload_with_params("second", &["b"])).unwrap();
        let foreign = ParamPayload::from(&store.get_by_id(first).unwrap().params[0]);
        let mut payload = tag_payload("second");
        payload.params = vec![foreign];
        let res = store.update(second, payload);
        assert!(matches!(res, Err(UpdateTagError::Validation(ref e)) if e.field == "params[0].id"));
        // nothing changed on the second tag
        assert_eq!("b", store.get_by_id(second).unwrap().params[0].db_column);
    }

    #[test]
    fn update_rejects_repeated_param_id() {
        let store = TagStore::new();
        let id = store
            .create(tag_payload_with_params("users", &["a", "b"]))
            .unwrap();
        let existing = store.get_by_id(id).unwrap();
        let mut payload = tag_payload("users");
        payload.params = vec![
            ParamPayload::from(&existing.params[0]),
            ParamPayload::from(&existing.params[0]),
        ];
        let res = store.update(id, payload);
        assert_eq!(
            Err(UpdateTagError::Validation(ValidationError::new(
                "params[1].id",
                "Parameter id 1 is listed more than once"
            ))),
            res
        );
        assert_eq!(existing, store.get_by_id(id).unwrap());
    }

    #[test]
    fn update_treats_param_id_zero_as_new() {
        let store = TagStore::new();
        let id = store.create(tag_payload_with_params("users", &["a"])).unwrap();
        let mut added = param_payload("b");
        added.id = Some(0);
        let mut payload = tag_payload("users");
        payload.params = vec![added];
        store.update(id, payload).unwrap();
        let updated = store.get_by_id(id).unwrap();
        assert_eq!(1, updated.params.len());
        assert_eq!(2, updated.params[0].id);
        assert_eq!("b", updated.params[0].db_column);
    }

    #[test]
    fn update_invalid_does_not_mutate() {
        let store = TagStore::new();
        let id = store.create(tag_payload("users")).unwrap();
        let mut payload = tag_payload("users");
        payload.query = "SELECT name".to_string();
        let res = store.update(id, payload);
        assert!(matches!(res, Err(UpdateTagError::Validation(_))));
        assert_eq!(
            "SELECT * FROM users WHERE id = :id",
            store.get_by_id(id).unwrap().query
        );
    }

    #[test]
    fn update_keeps_list_position() {
        let store = TagStore::new();
        let first = store.create(tag_payload("first")).unwrap();
        store.create(tag_payload("second")).unwrap();
        store.update(first, tag_payload("renamed")).unwrap();
        let names: Vec<String> = store.list().into_iter().map(|t| t.tag).collect();
        assert_eq!(vec!["renamed", "second"], names);
    }
}

mod delete_tag_tests {
    use crate::model::error::tag_errors::DeleteTagError;
    use crate::tags::store::TagStore;
    use crate::test::tag_payload_with_params;

    #[test]
    fn delete_removes_tag() {
        let store = TagStore::new();
        let id = store.create(tag_payload_with_params("users", &["id"])).unwrap();
        store.delete(id).unwrap();
        assert_eq!(None, store.get_by_id(id));
        assert_eq!(Err(DeleteTagError::TagNotFound), store.delete(id));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = TagStore::new();
        let id = store.create(tag_payload_with_params("users", &["id"])).unwrap();
        store.delete(id).unwrap();
        let new_id = store.create(tag_payload_with_params("users", &["id"])).unwrap();
        assert!(new_id > id);
        assert_eq!(2, store.get_by_id(new_id).unwrap().params[0].id);
    }
}

mod concurrent_update_tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use crate::tags::store::TagStore;
    use crate::test::{tag_payload, tag_payload_with_params};

    #[test]
    fn concurrent_updates_never_share_param_ids() {
        let store = Arc::new(TagStore::new());
        let id = store.create(tag_payload("users")).unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..25 {
                        store
                            .update(id, tag_payload_with_params("users", &["a", "b"]))
                            .unwrap();
                        store.create(tag_payload_with_params("other", &["c"])).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let all_ids: Vec<u32> = store
            .list()
            .iter()
            .flat_map(|t| t.params.iter().map(|p| p.id))
            .collect();
        let unique: HashSet<&u32> = all_ids.iter().collect();
        assert_eq!(all_ids.len(), unique.len());
        assert_eq!(201, store.list().len());
    }
}
