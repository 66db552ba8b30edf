mod segments_intersection2;
