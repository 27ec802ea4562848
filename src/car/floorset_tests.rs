/*
 * Unit tests for the floor set
 *
 * The unit tests follow the Arrange, Act, Assert pattern.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod floorset_tests {
    use crate::car::floorset::FloorSet;
    use crate::shared::Direction::{Down, Idle, Up};

    const N_FLOORS: u8 = 10;

    #[test]
    fn test_set_and_clear_return_previous_membership() {
        // Arrange
        let mut set = FloorSet::new(N_FLOORS);

        // Act / Assert
        assert!(!set.set(3));
        assert!(set.set(3));
        assert!(set.contains(3));
        assert!(set.clear(3));
        assert!(!set.clear(3));
        assert!(set.is_empty());
    }

    #[test]
    fn test_nearest_scans_strictly_beyond() {
        // Arrange
        let mut set = FloorSet::new(N_FLOORS);
        set.set(2);
        set.set(5);
        set.set(7);

        // Act / Assert
        assert_eq!(set.nearest(2, Up), Some(5));
        assert_eq!(set.nearest(0, Up), Some(2));
        assert_eq!(set.nearest(7, Up), None);
        assert_eq!(set.nearest(5, Down), Some(2));
        assert_eq!(set.nearest(2, Down), None);
    }

    #[test]
    fn test_nearest_handles_boundary_floors() {
        // Arrange
        let mut set = FloorSet::new(N_FLOORS);
        set.set(0);
        set.set(N_FLOORS - 1);

        // Act / Assert
        assert_eq!(set.nearest(0, Down), None);
        assert_eq!(set.nearest(N_FLOORS - 1, Up), None);
        assert_eq!(set.nearest(1, Down), Some(0));
        assert_eq!(set.nearest(N_FLOORS - 2, Up), Some(N_FLOORS - 1));
    }

    #[test]
    fn test_furthest_includes_the_query_floor() {
        // Arrange
        let mut set = FloorSet::new(N_FLOORS);
        set.set(5);

        // Act / Assert
        assert_eq!(set.furthest(5, Up), Some(5));
        assert_eq!(set.furthest(5, Down), Some(5));
        assert_eq!(set.furthest(3, Up), Some(5));
        assert_eq!(set.furthest(7, Up), None);
        assert_eq!(set.furthest(7, Down), Some(5));
        assert_eq!(set.furthest(3, Down), None);
    }

    #[test]
    fn test_furthest_picks_the_extremum() {
        // Arrange
        let mut set = FloorSet::new(N_FLOORS);
        set.set(2);
        set.set(8);

        // Act / Assert
        assert_eq!(set.furthest(4, Up), Some(8));
        assert_eq!(set.furthest(4, Down), Some(2));
    }

    #[test]
    fn test_extrema_of_empty_set() {
        let set = FloorSet::new(N_FLOORS);
        assert_eq!(set.lowest(), None);
        assert_eq!(set.highest(), None);
    }

    #[test]
    fn test_nearest_across_merges_sets() {
        // Arrange
        let mut dropoffs = FloorSet::new(N_FLOORS);
        let mut pickups = FloorSet::new(N_FLOORS);
        dropoffs.set(6);
        pickups.set(4);

        // Act / Assert
        assert_eq!(
            FloorSet::nearest_across(1, Up, &[&dropoffs, &pickups]),
            Some(4)
        );
        assert_eq!(
            FloorSet::nearest_across(4, Up, &[&dropoffs, &pickups]),
            Some(6)
        );
        assert_eq!(
            FloorSet::nearest_across(4, Down, &[&dropoffs, &pickups]),
            None
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_faults_on_out_of_range_floor() {
        let mut set = FloorSet::new(N_FLOORS);
        set.set(N_FLOORS);
    }

    #[test]
    #[should_panic(expected = "step offset")]
    fn test_nearest_faults_without_a_direction() {
        let mut set = FloorSet::new(N_FLOORS);
        set.set(3);
        set.nearest(0, Idle);
    }
}
