//! Tests for connection table validation and socket lookups

#[cfg(test)]
mod tests {
    use sockettile::ConfigurationError;
    use sockettile::algorithm::bitset::TileBitset;
    use sockettile::algorithm::connections::{ConnectionRules, ConnectionTable};
    use sockettile::spatial::tiles::{SocketLabel, TileCatalog, sockets};

    fn rules(entries: &[(&str, &[&str])]) -> ConnectionRules {
        entries
            .iter()
            .map(|(socket, targets)| {
                (
                    SocketLabel::from(*socket),
                    targets.iter().map(|t| SocketLabel::from(*t)).collect(),
                )
            })
            .collect()
    }

    fn road_catalog() -> TileCatalog {
        TileCatalog::new(vec![
            sockets(["grass", "grass", "grass", "grass"]),
            sockets(["road", "grass", "road", "grass"]),
        ])
    }

    #[test]
    fn test_valid_table() {
        let table = ConnectionTable::new(
            &rules(&[("grass", &["grass"]), ("road", &["road"])]),
            &road_catalog(),
        )
        .unwrap();

        assert_eq!(table.socket_count(), 2);
        assert!(table.compatible(&"road".into(), &"road".into()));
        assert!(!table.compatible(&"road".into(), &"grass".into()));
    }

    // Ids follow label order so tables built from equal rules agree
    #[test]
    fn test_ids_follow_label_order() {
        let table = ConnectionTable::new(
            &rules(&[("road", &["road"]), ("grass", &["grass"])]),
            &road_catalog(),
        )
        .unwrap();

        assert_eq!(table.id_of(&"grass".into()), Some(0));
        assert_eq!(table.id_of(&"road".into()), Some(1));
        assert_eq!(table.label_of(1), Some(&SocketLabel::from("road")));
        assert_eq!(table.id_of(&"water".into()), None);
        assert_eq!(table.label_of(2), None);
    }

    // A label used by a variant but absent from the rules is rejected
    // Verified by skipping the catalog scan
    #[test]
    fn test_missing_socket() {
        let result = ConnectionTable::new(&rules(&[("grass", &["grass"])]), &road_catalog());

        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::MissingSocket {
                socket: "road".into(),
                variant: 1,
            }
        );
    }

    #[test]
    fn test_unknown_target() {
        let catalog = TileCatalog::new(vec![sockets(["a", "a", "a", "a"])]);
        let result = ConnectionTable::new(&rules(&[("a", &["a", "x"])]), &catalog);

        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::UnknownSocket {
                socket: "a".into(),
                target: "x".into(),
            }
        );
    }

    // Verified by removing the reverse membership check
    #[test]
    fn test_asymmetric_rule() {
        let catalog = TileCatalog::new(vec![sockets(["a", "b", "a", "b"])]);
        let result = ConnectionTable::new(&rules(&[("a", &["b"]), ("b", &["b"])]), &catalog);

        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::AsymmetricRule {
                socket: "a".into(),
                target: "b".into(),
            }
        );
    }

    // Keys unused by the catalog are allowed as long as they are consistent
    #[test]
    fn test_extra_keys_are_accepted() {
        let catalog = TileCatalog::new(vec![sockets(["a", "a", "a", "a"])]);
        let table =
            ConnectionTable::new(&rules(&[("a", &["a", "b"]), ("b", &["a"])]), &catalog).unwrap();

        assert_eq!(table.socket_count(), 2);
        assert!(table.compatible(&"a".into(), &"b".into()));
        assert!(table.compatible(&"b".into(), &"a".into()));
        assert!(!table.compatible(&"b".into(), &"b".into()));
    }

    #[test]
    fn test_allowed_union() {
        let catalog = TileCatalog::new(vec![sockets(["a", "b", "c", "a"])]);
        let table = ConnectionTable::new(
            &rules(&[("a", &["b"]), ("b", &["a", "c"]), ("c", &["b"])]),
            &catalog,
        )
        .unwrap();

        let exposed = TileBitset::from_indices([0, 2], 3);
        assert_eq!(table.allowed_union(&exposed).to_vec(), vec![1]);

        let exposed = TileBitset::from_indices([1], 3);
        assert_eq!(table.allowed_union(&exposed).to_vec(), vec![0, 2]);

        assert!(table.allowed_union(&TileBitset::new(3)).is_empty());
    }
}
