mod property_lookahead;
mod property_mark_reset;
mod property_positions;
