/// Fixed, ordered wheel palette. An item keeps the entry picked at creation time.
pub const WHEEL_COLORS: [&str; 12] = [
    "#ef4444", // red
    "#f97316", // orange
    "#eab308", // yellow
    "#22c55e", // green
    "#06b6d4", // cyan
    "#3b82f6", // blue
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#10b981", // emerald
    "#f59e0b", // amber
    "#6366f1", // indigo
    "#84cc16", // lime
];

pub const PALETTE_SIZE: usize = WHEEL_COLORS.len();

/// Color index for an item created while `count_at_creation` items already exist.
pub fn color_index_for(count_at_creation: usize) -> u8 {
    (count_at_creation % PALETTE_SIZE) as u8
}

pub fn color_for(color_index: u8) -> &'static str {
    WHEEL_COLORS[color_index as usize % PALETTE_SIZE]
}
