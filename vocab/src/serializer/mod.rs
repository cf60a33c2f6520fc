//! Serializers for notebook graphs and the vocabulary.
//!
//! Only Turtle ([`turtle`]) is produced; it is the format ProvBook graphs are
//! exchanged in.

pub mod turtle;
