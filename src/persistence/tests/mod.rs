//! Tests for converting tool state to and from the annotation service
//! payload.
