mod ride;
