/*
 * Unit tests for the car drive
 *
 * The unit tests follow the Arrange, Act, Assert pattern. The drive runs on
 * its real tick timer, shortened so that trips complete in milliseconds.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod drive_tests {
    use crate::car::drive::{CarDrive, DestRequest, DriveNotification};
    use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
    use std::thread::spawn;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(3);
    const NO_EVENT: Duration = Duration::from_millis(100);
    const TIME_BETWEEN_FLOORS: Duration = Duration::from_millis(20);
    const N_FLOORS: u8 = 10;

    fn setup_drive() -> (
        CarDrive,
        Sender<DestRequest>,
        Receiver<DriveNotification>,
        Sender<()>,
    ) {
        // Arrange mock channels
        let (request_tx, request_rx) = unbounded::<DestRequest>();
        let (notification_tx, notification_rx) = unbounded::<DriveNotification>();
        let (terminate_tx, terminate_rx) = unbounded::<()>();

        (
            CarDrive::new(
                0,
                N_FLOORS,
                TIME_BETWEEN_FLOORS,
                request_rx,
                notification_tx,
                terminate_rx,
            ),
            request_tx,
            notification_rx,
            terminate_tx,
        )
    }

    fn request_dest(request_tx: &Sender<DestRequest>, target: u8) -> u8 {
        let (reply_tx, reply_rx) = bounded::<u8>(1);
        request_tx
            .send(DestRequest { target, reply_tx })
            .unwrap();
        reply_rx
            .recv_timeout(TIMEOUT)
            .expect("no reply from drive")
    }

    fn expect_notification(notification_rx: &Receiver<DriveNotification>, floor: u8, stopping: bool) {
        match notification_rx.recv_timeout(TIMEOUT) {
            Ok(notification) => {
                assert_eq!(notification.floor, floor);
                assert_eq!(notification.stopping, stopping);
            }
            Err(e) => panic!("Error receiving from notification_rx: {:?}", e),
        }
    }

    #[test]
    fn test_drive_starts_from_rest_and_reports_every_floor() {
        // Arrange
        let (drive, request_tx, notification_rx, terminate_tx) = setup_drive();
        let drive_thread = spawn(move || drive.run());

        // Act
        let effective = request_dest(&request_tx, 3);

        // Assert
        assert_eq!(effective, 3);
        expect_notification(&notification_rx, 1, false);
        expect_notification(&notification_rx, 2, false);
        expect_notification(&notification_rx, 3, true);

        // Cleanup
        terminate_tx.send(()).unwrap();
        drive_thread.join().unwrap();
    }

    #[test]
    fn test_drive_ignores_request_for_the_resting_floor() {
        // Arrange
        let (drive, request_tx, notification_rx, terminate_tx) = setup_drive();
        let drive_thread = spawn(move || drive.run());

        // Act
        let effective = request_dest(&request_tx, 0);

        // Assert: no movement
        assert_eq!(effective, 0);
        assert!(notification_rx.recv_timeout(NO_EVENT).is_err());

        // Cleanup
        terminate_tx.send(()).unwrap();
        drive_thread.join().unwrap();
    }

    #[test]
    fn test_drive_rejects_reversal_mid_trip() {
        // Arrange
        let (drive, request_tx, notification_rx, terminate_tx) = setup_drive();
        let drive_thread = spawn(move || drive.run());
        assert_eq!(request_dest(&request_tx, 5), 5);

        // Act: going up, so a request below is refused
        let effective = request_dest(&request_tx, 0);

        // Assert
        assert_eq!(effective, 5);
        for floor in 1..5 {
            expect_notification(&notification_rx, floor, false);
        }
        expect_notification(&notification_rx, 5, true);

        // Cleanup
        terminate_tx.send(()).unwrap();
        drive_thread.join().unwrap();
    }

    #[test]
    fn test_drive_stops_short_for_a_nearer_floor() {
        // Arrange
        let (drive, request_tx, notification_rx, terminate_tx) = setup_drive();
        let drive_thread = spawn(move || drive.run());
        assert_eq!(request_dest(&request_tx, 8), 8);

        // Act
        let effective = request_dest(&request_tx, 4);

        // Assert
        assert_eq!(effective, 4);
        for floor in 1..4 {
            expect_notification(&notification_rx, floor, false);
        }
        expect_notification(&notification_rx, 4, true);

        // Cleanup
        terminate_tx.send(()).unwrap();
        drive_thread.join().unwrap();
    }

    #[test]
    fn test_drive_extends_past_the_current_destination() {
        // Arrange
        let (drive, request_tx, notification_rx, terminate_tx) = setup_drive();
        let drive_thread = spawn(move || drive.run());
        assert_eq!(request_dest(&request_tx, 2), 2);

        // Act
        let effective = request_dest(&request_tx, 7);

        // Assert: the car rolls through 2 without stopping
        assert_eq!(effective, 7);
        for floor in 1..7 {
            expect_notification(&notification_rx, floor, false);
        }
        expect_notification(&notification_rx, 7, true);

        // Cleanup
        terminate_tx.send(()).unwrap();
        drive_thread.join().unwrap();
    }

    #[test]
    fn test_drive_faults_on_out_of_range_destination() {
        // Arrange
        let (drive, request_tx, _notification_rx, _terminate_tx) = setup_drive();
        let drive_thread = spawn(move || drive.run());

        // Act
        let (reply_tx, _reply_rx) = bounded::<u8>(1);
        request_tx
            .send(DestRequest {
                target: N_FLOORS,
                reply_tx,
            })
            .unwrap();

        // Assert
        assert!(drive_thread.join().is_err());
    }
}
