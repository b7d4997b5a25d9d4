use std::ffi::CStr;

use test_case::test_case;

use nesty::io::flat::decode_solution;
use nesty_ffi::*;

fn status(ptr: *const std::ffi::c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_owned()
}

const SQUARE_400: [i64; 10] = [1, 4, 0, 0, 400, 0, 400, 400, 0, 400];

#[test]
fn two_squares_end_to_end() {
    unsafe {
        let s = nesty_session_new();
        assert_eq!(nesty_append_bin_def(s, 1, 1, 1000, 1000, 0), NESTY_OK);
        assert_eq!(nesty_append_shape_def(s, 1, 2, SQUARE_400.as_ptr()), NESTY_OK);
        assert_eq!(status(nesty_execute_nesting(s, 0, 0)), "OK");

        let flat = nesty_get_solution(s);
        assert!(!flat.is_null());
        let expected = [2, 1, 0, 1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 400, 0, 0, 0, 0];
        let buffer = std::slice::from_raw_parts(flat, expected.len());
        assert_eq!(buffer, &expected);

        let solution = decode_solution(buffer).unwrap();
        assert_eq!(solution.n_placed(), 2);

        //ownership was handed over, a second fetch returns nothing
        assert!(nesty_get_solution(s).is_null());

        //clearing the session does not invalidate the fetched buffer
        nesty_clear(s);
        assert_eq!(buffer[0], 2);
        nesty_dispose_array64(flat);
        nesty_session_free(s);
    }
}

#[test]
fn overflow_is_reported_as_unplaced() {
    unsafe {
        let s = nesty_session_new();
        nesty_append_bin_def(s, 1, 1, 1000, 1000, 0);
        nesty_append_shape_def(s, 1, 10, SQUARE_400.as_ptr());
        assert_eq!(status(nesty_execute_nesting(s, 0, 0)), "OK");

        let flat = nesty_get_solution(s);
        let len = 1 + 8 * 4 + 1 + 6;
        let solution = decode_solution(std::slice::from_raw_parts(flat, len)).unwrap();
        assert_eq!(solution.n_placed(), 4);
        assert_eq!(solution.unplaced, vec![1; 6]);
        nesty_dispose_array64(flat);
        nesty_session_free(s);
    }
}

#[test_case(&[1, 2, 0, 0, 10, 0], NESTY_ERR_INVALID_GEOMETRY; "degenerate loop")]
#[test_case(&[0], NESTY_ERR_INVALID_GEOMETRY; "no loops")]
#[test_case(&[-3], NESTY_ERR_INVALID_GEOMETRY; "negative loop count")]
#[test_case(&[1, -1], NESTY_ERR_INVALID_GEOMETRY; "negative vertex count")]
#[test_case(&[1, 1 << 40], NESTY_ERR_INVALID_GEOMETRY; "oversized vertex count")]
#[test_case(&[1, 4, 0, 0, 10, 0, 0, 10, 10, 10], NESTY_ERR_INVALID_GEOMETRY; "bowtie")]
fn malformed_shapes_are_rejected(paths: &[i64], code: i32) {
    unsafe {
        let s = nesty_session_new();
        assert_eq!(nesty_append_shape_def(s, 1, 1, paths.as_ptr()), code);
        nesty_session_free(s);
    }
}

#[test_case(1, 0, 100, 100, 2; "unknown bin type")]
#[test_case(1, 0, 100, 100, 0; "zero count")]
#[test_case(1, 1, -100, 100, 0; "negative length")]
fn invalid_bins_are_rejected(id: i32, count: i32, length: i64, width: i64, bin_type: i32) {
    unsafe {
        let s = nesty_session_new();
        assert_eq!(
            nesty_append_bin_def(s, id, count, length, width, bin_type),
            NESTY_ERR_INVALID_PARAMETER
        );
        nesty_session_free(s);
    }
}

#[test]
fn structural_failures_are_reported_in_the_status() {
    unsafe {
        let s = nesty_session_new();
        assert!(status(nesty_execute_nesting(s, 0, 0)).starts_with("EMPTY_CATALOGUE: "));
        assert!(nesty_get_solution(s).is_null());

        nesty_append_bin_def(s, 1, 1, 100, 100, 0);
        nesty_append_shape_def(s, 1, 1, SQUARE_400.as_ptr());
        assert!(status(nesty_execute_nesting(s, -1, 0)).starts_with("INVALID_PARAMETER: "));
        assert!(status(nesty_execute_nesting(s, 0, 50)).starts_with("NO_USABLE_CAPACITY: "));
        assert!(nesty_get_solution(s).is_null());

        //a shape that does not fit is not a failure
        assert_eq!(status(nesty_execute_nesting(s, 0, 0)), "OK");
        let flat = nesty_get_solution(s);
        assert_eq!(*flat, 0);
        nesty_dispose_array64(flat);
        nesty_session_free(s);
    }
}

#[test]
fn unfetched_solution_is_released_with_the_session() {
    unsafe {
        let s = nesty_session_new();
        nesty_append_bin_def(s, 1, 1, 1000, 1000, 0);
        nesty_append_shape_def(s, 1, 1, SQUARE_400.as_ptr());
        assert_eq!(status(nesty_execute_nesting(s, 0, 0)), "OK");
        assert_eq!(status(nesty_execute_nesting(s, 0, 0)), "OK");
        nesty_session_free(s);
    }
}

#[test]
fn failed_execute_keeps_the_unfetched_solution() {
    unsafe {
        let s = nesty_session_new();
        nesty_append_bin_def(s, 1, 1, 1000, 1000, 0);
        nesty_append_shape_def(s, 1, 2, SQUARE_400.as_ptr());
        assert_eq!(status(nesty_execute_nesting(s, 0, 0)), "OK");
        assert!(status(nesty_execute_nesting(s, -1, 0)).starts_with("INVALID_PARAMETER: "));

        let flat = nesty_get_solution(s);
        assert!(!flat.is_null());
        let solution = decode_solution(std::slice::from_raw_parts(flat, 18)).unwrap();
        assert_eq!(solution.n_placed(), 2);
        nesty_dispose_array64(flat);

        //a successful execute replaces an unfetched buffer
        assert_eq!(status(nesty_execute_nesting(s, 0, 0)), "OK");
        assert_eq!(status(nesty_execute_nesting(s, 0, 0)), "OK");
        let flat = nesty_get_solution(s);
        assert!(!flat.is_null());
        assert!(nesty_get_solution(s).is_null());
        nesty_dispose_array64(flat);
        nesty_session_free(s);
    }
}
