pub mod backup;
pub mod del;
pub mod geo;
pub mod list;
pub mod location;
pub mod logview;
pub mod track;
pub mod tracker;
