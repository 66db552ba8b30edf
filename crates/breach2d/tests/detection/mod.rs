mod penetration2;
